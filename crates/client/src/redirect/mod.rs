//! Redirect following.
//!
//! The pieces are kept separate so each can be reasoned about on its own:
//!
//! - [`RedirectPolicy`]: is this a redirect, and what does the next request look like
//! - [`chain`]: walking parent links back to the root request
//! - [`RedirectGuard`]: the hop cap
//! - [`finalize`]: stamping the terminal response with chain metadata
//! - [`RedirectFollower`]: the loop tying them to a transport, installed in the client
//!   pipeline as the `redirect` interceptor

pub mod chain;

mod finalizer;
mod follower;
mod guard;
mod policy;

pub use finalizer::finalize;
pub use follower::RedirectFollower;
pub use guard::GuardDecision;
pub use guard::RedirectGuard;
pub use policy::RedirectPolicy;
pub use policy::RedirectTarget;
