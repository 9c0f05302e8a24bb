mod fixture_test;
mod instance_test;
mod resolution_test;
