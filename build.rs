fn main() {
    // `#[sqlx::test]` embeds the migrations directory at compile time
    println!("cargo:rerun-if-changed=migrations");
}
