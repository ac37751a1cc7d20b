pub mod middleware;
pub mod register;
pub mod sink;

pub use middleware::{TimingLayer, TimingService};
pub use register::{TimingRouterExt, TimingServiceBuilderExt};
pub use sink::{TimingSink, TracingSink};
