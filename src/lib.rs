//! swipedeck
//!
//! A swipe-card stack engine with a terminal host. Cards are dragged or
//! flicked off a small rendered stack that refills itself from a queue.
//!
//! Pure core: [`model`], [`geometry`], [`gesture`], [`state`].
//! Impure shell: [`config`], [`logging`], [`source`], [`view`].

pub mod config;
pub mod geometry;
pub mod gesture;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
