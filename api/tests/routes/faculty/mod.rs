mod records_test;
mod review_test;
mod submit_test;
