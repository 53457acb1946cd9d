mod geometry_tests;
