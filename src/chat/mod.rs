//! Chat domain modules
//!
//! Chat turns, the session store and the exchange controller, shared by the
//! web UI and the terminal client.

pub mod errors;
pub mod exchange;
pub mod session;
pub mod traits;
pub mod types;

pub use errors::{SessionError, SubmitError};
pub use exchange::{ChatExchange, ExchangeOutcome, SubmitReport};
pub use session::{Session, SessionInfo, SessionRegistry, SessionState};
pub use traits::AnswerService;
pub use types::{ChatRequest, ChatResponse, ChatTurn, Role};
