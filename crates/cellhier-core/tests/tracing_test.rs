use cellhier_core::tracing::init_tracing;

#[test]
fn init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
}

#[test]
fn init_tracing_tolerates_invalid_filter() {
    std::env::set_var("CELLHIER_LOG", "cellhier_refine=notalevel[");
    init_tracing();
}
