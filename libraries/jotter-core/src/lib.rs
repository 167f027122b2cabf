//! Jotter Core
//!
//! Platform-agnostic domain types, state machines and validation for the
//! Jotter notes client.
//!
//! This crate performs no I/O. The HTTP layer lives in `jotter-client`.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `Note`, `NoteDraft`, `Session`, `GuardState`
//! - **State Machines**: `OtpFlow` for the sign-up/sign-in code exchange
//! - **Local State**: `NoteList`, the list of notes shown to the user
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use jotter_core::{GuardState, Session, User, UserId};
//!
//! let session = Session::initial();
//! assert_eq!(session.guard(), GuardState::Loading);
//!
//! let user = User {
//!     id: UserId::new("1"),
//!     name: "Ada".into(),
//!     dob: "2000-01-01".into(),
//!     email: "ada@example.com".into(),
//! };
//! let session = Session::resolved(Some(user.clone()));
//! assert_eq!(session.guard(), GuardState::Authorized(user));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod note_list;
pub mod otp;
pub mod types;
pub mod validation;

pub use error::{CoreError, Result};
pub use note_list::NoteList;
pub use otp::{format_countdown, OtpFlow, OtpStage, RESEND_COOLDOWN};
pub use types::{GuardState, Note, NoteDraft, NoteId, Session, User, UserId};
