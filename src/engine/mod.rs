pub mod backpressure;
pub mod driver;
pub mod gate;

pub use backpressure::{Admission, AdmissionPermit, BackpressurePolicy};
pub use driver::spawn_node;
pub use gate::{GateState, ProcessingGate};
