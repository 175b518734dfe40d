//! Port mocks shared with downstream crates through the `testing` feature.


pub use mock_ports::*;
