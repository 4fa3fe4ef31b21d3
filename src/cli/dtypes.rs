use safe_asarray::DType;

pub fn cmd_dtypes() {
    println!("{:>3}  {:<8} {}", "num", "name", "bytes");
    for dtype in DType::ALL {
        println!("{:>3}  {:<8} {}", dtype.num(), dtype.name(), dtype.size());
    }
}
