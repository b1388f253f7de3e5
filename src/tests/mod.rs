//! Binary-side test suite: end-to-end scenarios against the library.

mod cli;
