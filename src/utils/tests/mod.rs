mod logger_tests;
