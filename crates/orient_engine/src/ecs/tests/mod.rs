//! Integration tests for the ECS workflow
