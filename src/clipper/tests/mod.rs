mod clipper_tests;
mod local_minima_tests;
mod out_rec_tests;
mod scanbeam_tests;
mod t_edge_tests;
