fn main() {
    nf_omics_task::app::cli::run();
}
