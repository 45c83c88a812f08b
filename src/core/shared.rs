/// Implemented by the per-operation configuration structs
/// (`decode::Config`, `encode::Config`, `io::obj::Config`).
pub trait ConfigType {
    fn default() -> Self;
}
