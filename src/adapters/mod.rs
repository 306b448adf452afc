pub mod filesystem;
pub mod multi_hasher;
pub mod output;
pub mod progress;

pub use filesystem::FileFactory;
pub use multi_hasher::MultiAlgorithmHasher;
pub use output::{ConsoleOutputAdapter, JsonOutputAdapter};
pub use progress::ProgressBarAdapter;
