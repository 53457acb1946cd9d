mod concatenate_tests;
