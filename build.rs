fn main() {
    build_deps::rerun_if_changed_paths("res/examples/**/*.calc").expect("could not read path");
}
