pub mod sample_collector;
pub mod subscriber;
