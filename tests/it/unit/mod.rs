mod model_tests;
mod space_tests;
