//! Unit tests for session gating.
