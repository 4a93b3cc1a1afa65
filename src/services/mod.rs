/// Core services: catalogue storage, the user directory, the similarity
/// graph and the recommendation pipeline that walks it.
pub mod catalogue;
pub mod graph;
pub mod recommendations;
pub mod registration;
pub mod traversal;
pub mod user_directory;

pub use catalogue::{Catalogue, LoadDiagnostic, LoadReport};
pub use graph::SimilarityGraph;
pub use recommendations::{recommend, MAX_RECOMMENDATIONS};
pub use registration::Registration;
pub use traversal::Traversal;
pub use user_directory::UserDirectory;
