mod review_test;
