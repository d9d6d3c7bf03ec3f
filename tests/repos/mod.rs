pub mod test_repo;
