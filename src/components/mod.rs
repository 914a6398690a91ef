pub mod match_list;
