//! Radial drill-down view over the cost hierarchy.

mod interaction;
mod view;
