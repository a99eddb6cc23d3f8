mod observer_tests;
