mod blocks_test;
mod middleware_test;
