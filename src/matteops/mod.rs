pub mod combine;
pub mod composite;
pub mod feather;
pub mod mask;
pub mod morphology;
pub mod pipeline;
pub mod resize;
pub mod smooth;
