mod policy_iteration_tests;
mod support;
