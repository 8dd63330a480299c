mod block_tests;
mod difference_tests;
mod ordered_tests;
mod source_tests;
mod unordered_tests;
mod util;
