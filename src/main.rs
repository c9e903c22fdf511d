fn main() {
    safeguard_lib::run()
}
