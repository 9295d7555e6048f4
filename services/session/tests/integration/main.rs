mod authorize_test;
mod guard_test;
