fn main() {
    stack::app::cli::run();
}
