fn main() {
    // Askama compiles templates into the binary; rebuild when they change.
    println!("cargo:rerun-if-changed=templates");
}
