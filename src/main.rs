fn main() {
    scmdoc::cli::run();
}
