pub mod error;
pub mod report;

pub use error::{RepoLensError, Result, RetrievalError};
pub use report::{
    AnalysisIr, AnalysisResponse, AnalysisWarning, Architecture, Degraded, DependencyInfo,
    EndpointGroup, ExternalDependency, ModuleInfo, ModuleRecord, Overview, Priority,
    Recommendation, ResponseMeta, RiskInfo, StackInfo, StructureInfo, StructureType,
    Visualization,
};
