pub mod config;
pub mod demo;
pub mod logging;
pub mod timing;

pub use timing::{
    TimingLayer, TimingRouterExt, TimingService, TimingServiceBuilderExt, TimingSink, TracingSink,
};
