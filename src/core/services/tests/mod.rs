mod stats_service_tests;
