mod timer_tests;
