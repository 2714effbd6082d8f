//! Integration tests driving the full HTTP stack.

mod file_test;
mod helpers;
mod note_test;
