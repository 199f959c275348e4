pub mod print_tree;
