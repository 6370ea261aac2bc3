mod new_tests;
mod shape_tests;
