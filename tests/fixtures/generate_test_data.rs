// ==========================================
// 电缆仓储系统 - 测试数据生成器
// ==========================================
// 用途: 生成固定的批次导入测试 CSV 文件
// 运行: cargo run --bin generate_test_data
// 输出: tests/fixtures/data/*.csv
// ==========================================

use std::fs;
use std::io::Write;
use std::path::Path;

const OUT_DIR: &str = "tests/fixtures/data";
const HEADER: &str = "position,drum_code,length";

fn write_csv(name: &str, rows: &[[&str; 3]]) -> std::io::Result<()> {
    let path = Path::new(OUT_DIR).join(name);
    let mut file = fs::File::create(&path)?;

    writeln!(file, "{HEADER}")?;
    for [position, drum_code, length] in rows {
        // 含小数逗号的长度需要 CSV 引号包裹
        let length_field = if length.contains(',') {
            format!("\"{length}\"")
        } else {
            (*length).to_string()
        };
        writeln!(file, "{position},{drum_code},{length_field}")?;
    }

    println!("generating {name}");
    Ok(())
}

fn main() -> std::io::Result<()> {
    fs::create_dir_all(OUT_DIR)?;

    // 1) 有效数据集
    write_csv(
        "batch_valid.csv",
        &[
            ["1", "DRUM-001", "250"],
            ["2", "DRUM-002", "300"],
            ["3", "DRUM-003", "150.5"],
            ["4", "DRUM-004", "100"],
            ["5", "DRUM-005", "50"],
        ],
    )?;

    // 2) 位置重复
    write_csv(
        "batch_dup_positions.csv",
        &[
            ["1", "DRUM-001", "200"],
            ["1", "DRUM-002", "200"], // 位置重复
            ["2", "DRUM-003", "100"],
            ["3", "DRUM-004", "120"],
        ],
    )?;

    // 3) 缺失位置
    write_csv(
        "batch_missing_positions.csv",
        &[
            ["", "DRUM-001", "200"],    // 缺失
            ["   ", "DRUM-002", "180"], // 仅空白
            ["", "DRUM-003", "150"],    // 空单元格
            ["3", "DRUM-004", "120"],
        ],
    )?;

    // 4) 非法长度
    write_csv(
        "batch_invalid_lengths.csv",
        &[
            ["1", "DRUM-001", "0"],       // 零
            ["2", "DRUM-002", "-5"],      // 负数
            ["3", "DRUM-003", "text"],    // 非数字
            ["4", "DRUM-004", "5000000"], // 超上限
            ["5", "DRUM-005", "12,5"],    // 小数逗号
        ],
    )?;

    // 5) 混合错误
    write_csv(
        "batch_mixed.csv",
        &[
            ["1", "DRUM-001", "100"],
            ["1", "DRUM-001", "90"], // 位置重复
            ["2", "", "120"],        // 盘具编码为空
            ["3", "DRUM-003", ""],   // 长度为空
            ["4", "DRUM-004", "-1"], // 负长度
            ["5", "DRUM-004", "50"],
        ],
    )?;

    Ok(())
}
