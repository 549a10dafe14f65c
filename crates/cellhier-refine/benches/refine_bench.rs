use criterion::{criterion_group, criterion_main, Criterion};

use cellhier_core::config::RefinerConfig;
use cellhier_core::models::{EdgeRow, TermRow};
use cellhier_refine::{ContainmentReorganizer, HierarchyRefiner, OntologyBuilder};

const GENES: usize = 256;
const LEVELS: u32 = 6;

/// A binary partition of 256 genes over 6 resolutions (63 terms) plus a
/// near-duplicate of every level-3 term. Odd-numbered blocks hang off their
/// grandparent instead of their parent, so the reorganizer has work to do.
fn build_multiresolution() -> (Vec<TermRow>, Vec<EdgeRow>) {
    let mut terms = Vec::new();
    let mut edges = Vec::new();
    for level in 0..LEVELS {
        let blocks = 1usize << level;
        let width = GENES / blocks;
        for b in 0..blocks {
            let name = format!("L{level}_{b}");
            let genes = (b * width..(b + 1) * width).map(|g| g.to_string()).collect();
            terms.push(TermRow::new(name.clone(), genes, f64::from(level)));
            if level > 0 && b % 2 == 0 {
                edges.push(EdgeRow::default_edge(format!("L{}_{}", level - 1, b / 2), name));
            } else if level > 1 {
                edges.push(EdgeRow::default_edge(format!("L{}_{}", level - 2, b / 4), name));
            }
        }
    }
    let width = GENES >> 3;
    for b in 0..8 {
        let genes = (b * width + 1..(b + 1) * width).map(|g| g.to_string()).collect();
        terms.push(TermRow::new(format!("dup3_{b}"), genes, 0.5));
        edges.push(EdgeRow::default_edge(format!("L2_{}", b / 2), format!("dup3_{b}")));
    }
    (terms, edges)
}

fn bench_ontology_build(c: &mut Criterion) {
    let (terms, edges) = build_multiresolution();
    let builder = OntologyBuilder::new(4);

    c.bench_function("ontology_build_71_terms", |b| {
        b.iter(|| builder.build(&terms, &edges).unwrap());
    });
}

fn bench_reorganize(c: &mut Criterion) {
    let (terms, edges) = build_multiresolution();
    let base = OntologyBuilder::new(4).build(&terms, &edges).unwrap();
    let reorganizer = ContainmentReorganizer::new(0.75);

    c.bench_function("containment_reorganize_71_terms", |b| {
        b.iter(|| {
            let mut graph = base.clone();
            reorganizer.run(&mut graph).unwrap();
        });
    });
}

fn bench_full_refine(c: &mut Criterion) {
    let (terms, edges) = build_multiresolution();
    let refiner = HierarchyRefiner::new(RefinerConfig::default()).unwrap();

    c.bench_function("refine_71_terms", |b| {
        b.iter(|| refiner.refine(&terms, &edges).unwrap());
    });
}

criterion_group!(benches, bench_ontology_build, bench_reorganize, bench_full_refine);
criterion_main!(benches);
