use crate::clipper::scanbeam::Scanbeam;

fn drain(scanbeam: &mut Scanbeam) -> Vec<i64> {
    let mut result = Vec::new();

    while let Some(y) = scanbeam.pop() {
        result.push(y);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_pop() {
        let mut scanbeam = Scanbeam::new();

        scanbeam.insert(5);
        scanbeam.insert(3);
        scanbeam.insert(7);
        scanbeam.insert(3);

        assert_eq!(drain(&mut scanbeam), vec![7, 5, 3]);
        assert_eq!(scanbeam.pop(), None);
    }

    #[test]
    fn test_pop_empty() {
        let mut scanbeam = Scanbeam::new();

        assert_eq!(scanbeam.pop(), None);
    }

    #[test]
    fn test_clear() {
        let mut scanbeam = Scanbeam::new();
        scanbeam.insert(1);
        scanbeam.insert(2);
        scanbeam.clear();

        assert!(drain(&mut scanbeam).is_empty());
    }

    #[test]
    fn test_extreme_rows() {
        let mut scanbeam = Scanbeam::default();

        scanbeam.insert(-0x3FFF_FFFF_FFFF_FFFF);
        scanbeam.insert(0);
        scanbeam.insert(0x3FFF_FFFF_FFFF_FFFF);

        assert_eq!(
            drain(&mut scanbeam),
            vec![0x3FFF_FFFF_FFFF_FFFF, 0, -0x3FFF_FFFF_FFFF_FFFF]
        );
    }
}
