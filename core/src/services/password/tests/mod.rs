mod strategy_tests;
