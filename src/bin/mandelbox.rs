// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
extern crate failure;
extern crate log;
extern crate mandelbox;
extern crate num;
extern crate num_cpus;
extern crate rand;

use clap::{App, Arg, ArgMatches};
use failure::{format_err, Error};
use log::info;
use mandelbox::shade::{shade, shade_sparse, write_image};
use mandelbox::{scatter, Mandelbox, PlaneMapper, Real, SliceRenderer, Viewport};
use num::{Complex, NumCast};
use std::str::FromStr;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_point(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn parse_slice(s: &str) -> Option<Vec<f64>> {
    s.split(',').map(|v| f64::from_str(v.trim()).ok()).collect()
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn validate_float(s: &str, err: &str) -> Result<(), String> {
    match f64::from_str(s) {
        Ok(f) if f.is_finite() => Ok(()),
        _ => Err(err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";
const SCALE: &str = "scale";
const DIMENSION: &str = "dimension";
const SLICE: &str = "slice";
const PRECISION: &str = "precision";
const SAMPLES: &str = "samples";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandelbox")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Renders a slice of the Mandelbox distance field")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file (PGM)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("640x640")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .required(false)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-4.0,-4.0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner of the slice"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .required(false)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("4.0,4.0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Right upper corner of the slice"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in the renderer"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("10")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        100_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 100000",
                    )
                })
                .help("Number of fold passes per pixel"),
        )
        .arg(
            Arg::with_name(SCALE)
                .required(false)
                .long(SCALE)
                .short("k")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-1.5")
                .validator(|s| validate_float(&s, "Could not parse scale"))
                .help("Box and sphere fold scale"),
        )
        .arg(
            Arg::with_name(DIMENSION)
                .required(false)
                .long(DIMENSION)
                .short("d")
                .takes_value(true)
                .default_value("2")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        16,
                        "Could not parse dimension",
                        "Dimension must be between 1 and 16",
                    )
                })
                .help("Number of axes in the field"),
        )
        .arg(
            Arg::with_name(SLICE)
                .required(false)
                .long(SLICE)
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| match parse_slice(&s) {
                    Some(_) => Ok(()),
                    None => Err("Could not parse slice origin".to_string()),
                })
                .help("Comma separated origin of the slice, one value per axis"),
        )
        .arg(
            Arg::with_name(PRECISION)
                .required(false)
                .long(PRECISION)
                .short("p")
                .takes_value(true)
                .possible_values(&["single", "double"])
                .default_value("double")
                .help("Floating point precision of the field"),
        )
        .arg(
            Arg::with_name(SAMPLES)
                .required(false)
                .long(SAMPLES)
                .takes_value(true)
                .default_value("0")
                .validator(|s| match usize::from_str(&s) {
                    Ok(_) => Ok(()),
                    Err(_) => Err("Could not parse sample count".to_string()),
                })
                .help("Sample this many random pixels instead of rendering all of them"),
        )
        .get_matches()
}

/// Everything the command line decides about a render.
#[derive(Debug)]
struct RenderConfig {
    output: String,
    size: (usize, usize),
    leftlower: Complex<f64>,
    rightupper: Complex<f64>,
    threads: usize,
    iterations: usize,
    scale: f64,
    dimension: usize,
    slice: Option<Vec<f64>>,
    double: bool,
    samples: usize,
}

fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, Error> {
    let raw = matches
        .value_of(name)
        .ok_or_else(|| format_err!("Missing value for --{}", name))?;
    T::from_str(raw).map_err(|_| format_err!("Could not parse --{} {}", name, raw))
}

impl RenderConfig {
    fn from_matches(matches: &ArgMatches) -> Result<RenderConfig, Error> {
        let size = matches
            .value_of(SIZE)
            .and_then(|s| parse_pair(s, 'x'))
            .ok_or_else(|| format_err!("Error parsing image dimensions"))?;
        let leftlower = matches
            .value_of(LEFTLOWER)
            .and_then(parse_point)
            .ok_or_else(|| format_err!("Error parsing left lower point"))?;
        let rightupper = matches
            .value_of(RIGHTUPPER)
            .and_then(parse_point)
            .ok_or_else(|| format_err!("Error parsing right upper point"))?;
        let slice = match matches.value_of(SLICE) {
            Some(s) => Some(parse_slice(s).ok_or_else(|| format_err!("Error parsing slice"))?),
            None => None,
        };
        Ok(RenderConfig {
            output: value(matches, OUTPUT)?,
            size,
            leftlower,
            rightupper,
            threads: value(matches, THREADS)?,
            iterations: value(matches, ITERATIONS)?,
            scale: value(matches, SCALE)?,
            dimension: value(matches, DIMENSION)?,
            slice,
            double: matches.value_of(PRECISION) != Some("single"),
            samples: value(matches, SAMPLES)?,
        })
    }
}

fn run<T: Real>(config: &RenderConfig) -> Result<(), Error> {
    let scale: T = <T as NumCast>::from(config.scale)
        .ok_or_else(|| format_err!("Scale {} does not fit the chosen precision", config.scale))?;
    let field = Mandelbox::new(config.dimension, scale, config.iterations)?;
    let plane = PlaneMapper::new(config.size.0, config.size.1, config.leftlower, config.rightupper)?;
    let origin = match config.slice {
        Some(ref slice) => slice.clone(),
        None => vec![0.0; config.dimension],
    };
    let renderer = SliceRenderer::new(field, Viewport::new(plane, origin)?)?;

    let pixels = if config.samples > 0 {
        let mut rng = rand::thread_rng();
        shade_sparse(&scatter(&renderer, config.samples, &mut rng)?)
    } else {
        shade(&renderer.render(config.threads)?)
    };
    write_image(&config.output, &pixels, config.size)?;
    info!("Wrote {}", config.output);
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    let result = RenderConfig::from_matches(&matches).and_then(|config| {
        info!("{:?}", config);
        if config.double {
            run::<f64>(&config)
        } else {
            run::<f32>(&config)
        }
    });

    if let Err(e) = result {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
