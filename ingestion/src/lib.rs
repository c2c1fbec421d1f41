pub mod loader;
pub mod records;

pub use loader::{build_graph, load_dir, LoadError};
pub use records::{DiseaseRecord, DoctorRecord, KnowledgeRecords, SymptomRecord};
