//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements  | Connects to                     |
//! |---------------|-------------|---------------------------------|
//! | `sim`         | RobotPort   | In-process simulated robot      |
//! | `log_sink`    | EventSink   | `log` facade (stderr via env_logger) |
//! | `json_config` | ConfigPort  | JSON file on disk               |

pub mod json_config;
pub mod log_sink;
pub mod sim;
