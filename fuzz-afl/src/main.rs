#[macro_use]
extern crate afl;

fn main() {
    fuzz!(|data: &[u8]| {
        let mut v = data.to_vec();
        blipsort::sort(&mut v);
        assert!(v.windows(2).all(|w| w[0] <= w[1]));
    });
}
