//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements        | Connects to                 |
//! |----------------|-------------------|-----------------------------|
//! | `directory`    | ChannelDirectory  | channel list from config    |
//! | `json_lines`   | MessageSource     | JSON-lines reader (stdin)   |
//! | `log_lights`   | LightPort         | log output                  |
//! | `log_notifier` | NotifierPort      | log output                  |
//! | `log_sink`     | EventSink         | log output                  |

pub mod directory;
pub mod json_lines;
pub mod log_lights;
pub mod log_notifier;
pub mod log_sink;
