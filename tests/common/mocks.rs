//! Mock versions of an output file and an input stream.
use mockall::mock;

use std::io::{self, Read, Write};

mock! {
    pub File {}
    impl Write for File {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize>;
        fn flush(&mut self) -> io::Result<()>;
    }
}

mock! {
    pub Input {}
    impl Read for Input {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;
    }
}
