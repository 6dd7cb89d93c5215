use{
    serde::{Serialize, de::DeserializeOwned},
    serde_json::Value,
    std::{
        fs::File,
        io::{BufReader, Write},
        process::exit,
    },
};

/// Reads the parameter struct from the given json file. Without a file
/// the default parameters are printed as example json and the program
/// exits.
pub fn parse<T>(json: Option<&String>) -> (T, Value)
where T: Default + Serialize + DeserializeOwned
{
    match json{
        None => {
            let example = T::default();
            serde_json::to_writer_pretty(
                std::io::stdout(),
                &example
            ).expect("unable to reach stdout");
            println!();
            exit(0)
        },
        Some(file) => {
            let f = File::open(file)
                .expect("unable to open json file");
            let buf = BufReader::new(f);
            let json_val: Value = serde_json::from_reader(buf)
                .expect("unable to parse json");
            let opt: T = serde_json::from_value(json_val.clone())
                .expect("wrong json format");
            (opt, json_val)
        }
    }
}

//the json the run was started with goes into the first line of every
//data file
pub fn write_json<W: Write>(mut writer: W, json: &Value){
    write!(writer, "#").unwrap();
    serde_json::to_writer(&mut writer, json).unwrap();
    writeln!(writer).unwrap();
}
