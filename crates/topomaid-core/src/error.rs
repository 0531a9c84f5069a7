pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "sub-topology color palette exhausted: all {palette_size} colors are in use (call reset() or translate fewer sub-topologies)"
    )]
    PaletteExhausted { palette_size: usize },
}
