//! End-to-end tests for the assembled server live in `tests/`.
