mod submission_mock;

// Integration tests for the planner library:
// - smoke_tests: configuration and calendar generation through the public API
// - submission_mock: a full screen session against an in-memory submission service
