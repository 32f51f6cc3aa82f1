//! 数据集列画像

use config_abstractions::ColumnType;
use std::io::Read;

/// 单列画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnProfile {
    /// 列名
    pub name: String,
    /// 推断出的列类型
    pub inferred_type: ColumnType,
    /// 空单元格数量
    pub null_count: usize,
}

/// 数据集画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetProfile {
    /// 按表头顺序排列的列
    pub columns: Vec<ColumnProfile>,
    /// 数据行数（不含表头）
    pub row_count: usize,
}

impl DatasetProfile {
    /// 读取带表头的 CSV 并推断每列类型
    ///
    /// 没有表头时返回的画像不含任何列
    pub fn from_csv<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Fields)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let mut inference: Vec<TypeInference> =
            headers.iter().map(|_| TypeInference::default()).collect();

        let mut row_count = 0;
        for record in reader.records() {
            let record = record?;
            for (cell, column) in record.iter().zip(inference.iter_mut()) {
                column.observe(cell);
            }
            row_count += 1;
        }

        let columns = headers
            .iter()
            .zip(inference)
            .map(|(name, column)| ColumnProfile {
                name: name.to_string(),
                inferred_type: column.resolve(),
                null_count: column.nulls,
            })
            .collect();

        Ok(Self { columns, row_count })
    }

    /// 列名列表
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// 按列名查找
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// 逐单元格收窄的类型推断状态
#[derive(Debug, Clone, Copy)]
struct TypeInference {
    all_int: bool,
    all_float: bool,
    all_bool: bool,
    values: usize,
    nulls: usize,
}

impl Default for TypeInference {
    fn default() -> Self {
        Self {
            all_int: true,
            all_float: true,
            all_bool: true,
            values: 0,
            nulls: 0,
        }
    }
}

impl TypeInference {
    fn observe(&mut self, cell: &str) {
        if cell.is_empty() {
            self.nulls += 1;
            return;
        }

        self.values += 1;
        if self.all_int && cell.parse::<i64>().is_err() {
            self.all_int = false;
        }
        if self.all_float && cell.parse::<f64>().is_err() {
            self.all_float = false;
        }
        if self.all_bool
            && !(cell.eq_ignore_ascii_case("true") || cell.eq_ignore_ascii_case("false"))
        {
            self.all_bool = false;
        }
    }

    fn resolve(self) -> ColumnType {
        // 全空列按浮点处理，与 NaN 填充一致
        if self.values == 0 {
            return ColumnType::Float64;
        }

        // 含空值的整数列提升为浮点，含空值的布尔列退化为 object
        if self.all_int && self.nulls == 0 {
            ColumnType::Int64
        } else if self.all_float {
            ColumnType::Float64
        } else if self.all_bool && self.nulls == 0 {
            ColumnType::Bool
        } else {
            ColumnType::Object
        }
    }
}
