fn main() {
    graft::cli::run();
}
