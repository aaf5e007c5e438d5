mod test_collections;
mod test_time_diff;
